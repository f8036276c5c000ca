#[cfg(test)]
mod tests {
    use crate::index::MediaIndex;
    use crate::paths;
    use crate::types::{MediaKind, MediaRecord};

    fn rec(path: &str) -> MediaRecord {
        MediaRecord::new(path, 10, None).unwrap()
    }

    #[tokio::test]
    async fn starts_empty_at_generation_zero() {
        let index = MediaIndex::new();
        let snap = index.snapshot().await;
        assert!(snap.is_empty());
        assert_eq!(snap.generation(), 0);
        assert!(snap.built_at().is_none());
    }

    #[tokio::test]
    async fn rebuild_replaces_everything() {
        let index = MediaIndex::new();
        index.rebuild(vec![rec("/D/Movies/a.mp4"), rec("/D/Music/c.mp3")]).await;
        let first = index.snapshot().await;
        assert_eq!(first.len(), 2);
        assert_eq!(first.generation(), 1);
        assert!(first.built_at().is_some());

        index.rebuild(vec![rec("/E/Other/x.mkv")]).await;
        let second = index.snapshot().await;
        assert_eq!(second.generation(), 2);
        assert_eq!(second.len(), 1);
        assert!(second.get_by_path("/D/Movies/a.mp4").is_none());

        // a reader holding the old snapshot is unaffected
        assert_eq!(first.len(), 2);
        assert!(first.get_by_path("/D/Movies/a.mp4").is_some());
    }

    #[tokio::test]
    async fn rebuild_with_nothing_clears_the_index() {
        let index = MediaIndex::new();
        index.rebuild(vec![rec("/D/Movies/a.mp4")]).await;
        let snap = index.rebuild(Vec::new()).await;
        assert!(snap.is_empty());
        assert_eq!(snap.generation(), 2);
    }

    #[tokio::test]
    async fn duplicate_paths_keep_first_occurrence() {
        let index = MediaIndex::new();
        let mut dup = rec("/D/Movies/a.mp4");
        dup.size = 999;
        let snap = index.rebuild(vec![rec("/D/Movies/a.mp4"), dup, rec("/D/Movies/b.mkv")]).await;
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get_by_path("/D/Movies/a.mp4").unwrap().size, 10);
    }

    #[tokio::test]
    async fn filtered_by_kind() {
        let index = MediaIndex::new();
        let snap = index
            .rebuild(vec![rec("/D/Movies/a.mp4"), rec("/D/Music/c.mp3"), rec("/D/Music/d.FLAC")])
            .await;
        assert_eq!(snap.filtered(None).len(), 3);
        assert_eq!(snap.filtered(Some(MediaKind::Video)).len(), 1);
        let audio = snap.filtered(Some(MediaKind::Audio));
        assert_eq!(audio.len(), 2);
        assert!(audio.iter().all(|r| r.kind == MediaKind::Audio));
    }

    #[tokio::test]
    async fn lookup_by_id() {
        let index = MediaIndex::new();
        let snap = index.rebuild(vec![rec("D:\\Filme\\Ärger.mkv")]).await;
        let id = paths::encode_id("D:/Filme/Ärger.mkv");
        let found = snap.get_by_id(&id).unwrap();
        assert_eq!(found.path, "D:/Filme/Ärger.mkv");
        assert_eq!(found.id, id);

        assert!(snap.get_by_id(&paths::encode_id("/not/indexed.mp4")).is_none());
        assert!(snap.get_by_id("%%%").is_none());
    }

    #[tokio::test]
    async fn readers_never_see_partial_rebuilds() {
        let index = MediaIndex::new();
        let big: Vec<MediaRecord> = (0..500).map(|i| rec(&format!("/D/Movies/{}.mp4", i))).collect();

        let writer = {
            let index = index.clone();
            tokio::spawn(async move {
                for _ in 0..20 {
                    index.rebuild(big.clone()).await;
                    index.rebuild(Vec::new()).await;
                }
            })
        };
        let reader = {
            let index = index.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let snap = index.snapshot().await;
                    assert!(snap.len() == 0 || snap.len() == 500);
                    tokio::task::yield_now().await;
                }
            })
        };
        writer.await.unwrap();
        reader.await.unwrap();
        assert_eq!(index.snapshot().await.generation(), 40);
    }

    #[test]
    fn record_fields_are_derived_from_the_path() {
        let r = rec("C:\\Users\\me\\Videos\\Clip.MP4");
        assert_eq!(r.path, "C:/Users/me/Videos/Clip.MP4");
        assert_eq!(r.name, "Clip.MP4");
        assert_eq!(r.directory, "C:/Users/me/Videos");
        assert_eq!(r.folder_name, "Videos");
        assert_eq!(r.extension, "mp4");
        assert_eq!(r.kind, MediaKind::Video);

        let top = rec("D:/song.ogg");
        assert_eq!(top.directory, "D:");
        assert_eq!(top.folder_name, "D:");

        assert!(MediaRecord::new("/D/readme.txt", 1, None).is_none());
        assert!(MediaRecord::new("/D/noext", 1, None).is_none());
    }

    #[test]
    fn record_serializes_with_camel_case_and_type() {
        let v = serde_json::to_value(rec("/D/Music/c.mp3")).unwrap();
        assert_eq!(v["type"], "audio");
        assert_eq!(v["folderName"], "Music");
        assert_eq!(v["directory"], "/D/Music");
        assert!(v["modifiedTime"].is_null());
        assert!(v.get("kind").is_none());
    }
}
