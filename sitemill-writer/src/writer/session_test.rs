#[cfg(test)]
mod tests {
    use crate::writer::session::{has_extension, replace_extension, WriterSession, WriterState};
    use crate::{StateError, WriterError};
    use sitemill_core::{Renderer, StagingStore};
    use sitemill_storage::MemoryStore;
    use std::sync::Arc;

    fn session() -> WriterSession {
        let store: Arc<dyn StagingStore> = Arc::new(MemoryStore::new());
        WriterSession::new(store, Renderer::url_set("UTF-8"), "a/a_part0.xml.tmp".to_string())
    }

    #[test]
    fn test_has_extension_requires_full_suffix() {
        assert!(has_extension("a/a_part0.xml.tmp", "xml.tmp"));
        assert!(has_extension("a/a_part0.xml", "xml"));
        assert!(!has_extension("a/a_part0.xml.tmp", "xml"));
        assert!(!has_extension("a/a_part0.xml", "xml.tmp"));
        // "sitemapxml" carries no extension at all
        assert!(!has_extension("sitemapxml", "xml"));
    }

    #[test]
    fn test_replace_extension() {
        assert_eq!(
            replace_extension("a/a_part3.xml.tmp", "xml.tmp", "xml").unwrap(),
            "a/a_part3.xml"
        );
        match replace_extension("a/a_part3.xml", "xml.tmp", "xml") {
            Err(WriterError::PathFormat { path, extension }) => {
                assert_eq!(path, "a/a_part3.xml");
                assert_eq!(extension, "xml.tmp");
            }
            other => panic!("expected PathFormat, got {:?}", other),
        }
    }

    /// Test: Lifecycle guards
    ///
    /// Purpose
    /// - Each illegal transition reports its own StateError variant
    ///
    /// Flow
    /// - Probe the guards in NotStarted, Started and Finished
    ///
    /// Expected
    /// - NotStarted: start allowed, write/finish refused with NotStarted
    /// - Started: start refused with AlreadyStarted
    /// - Finished: everything refused with AlreadyFinished
    #[test]
    fn test_lifecycle_guards() {
        let mut session = session();
        assert_eq!(session.state(), WriterState::NotStarted);
        assert!(session.ensure_can_start().is_ok());
        assert!(matches!(
            session.ensure_started(),
            Err(WriterError::State(StateError::NotStarted))
        ));

        session.mark_started();
        assert!(session.ensure_started().is_ok());
        assert!(matches!(
            session.ensure_can_start(),
            Err(WriterError::State(StateError::AlreadyStarted))
        ));

        session.mark_finished();
        assert!(matches!(
            session.ensure_started(),
            Err(WriterError::State(StateError::AlreadyFinished))
        ));
        assert!(matches!(
            session.ensure_can_start(),
            Err(WriterError::State(StateError::AlreadyFinished))
        ));
    }

    #[tokio::test]
    async fn test_counters_only_exist_for_written_paths() {
        let mut session = session();
        session.open("a/a_part0.xml.tmp".to_string()).await.unwrap();
        assert_eq!(session.entries_in_current(), 0);
        assert_eq!(session.total_entries(), 0);

        let entry = sitemill_core::Entry::new(
            sitemill_core::Location::new("https://example.com/x").unwrap(),
        );
        session.append(&entry).await.unwrap();
        session.append(&entry).await.unwrap();
        session.open("a/a_part1.xml.tmp".to_string()).await.unwrap();
        assert_eq!(session.entries_in_current(), 0);
        session.append(&entry).await.unwrap();

        assert_eq!(session.entries_in_current(), 1);
        assert_eq!(session.total_entries(), 3);
        session.close_stream().await.unwrap();
        assert_eq!(session.current_size(), 0);
    }
}
