#[cfg(test)]
mod tests {
    use crate::{GenerationEvent, GenerationListener, LoggingListener, NoopListener};
    use tokio::sync::mpsc;

    #[test]
    fn test_channel_listener_forwards_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let listener: &dyn GenerationListener = &tx;

        listener.notify(&GenerationEvent::SourceStarted {
            source: "products".to_string(),
        });
        listener.notify(&GenerationEvent::SourceEntryWritten {
            source: "products".to_string(),
            entries_written: 1,
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            GenerationEvent::SourceStarted {
                source: "products".to_string()
            }
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            GenerationEvent::SourceEntryWritten { entries_written: 1, .. }
        ));
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel::<GenerationEvent>();
        drop(rx);
        tx.notify(&GenerationEvent::IndexFinished {
            path: "index.xml".to_string(),
        });
    }

    #[test]
    fn test_builtin_listeners_accept_every_event() {
        let events = vec![
            GenerationEvent::IndexStarted {
                sources: vec!["products".to_string()],
            },
            GenerationEvent::SourceFinished {
                source: "products".to_string(),
                paths: vec!["products/products_part0.xml".to_string()],
            },
            GenerationEvent::IndexEntryWritten {
                path: "products/products_part0.xml".to_string(),
            },
        ];
        for event in &events {
            NoopListener.notify(event);
            LoggingListener.notify(event);
        }
    }
}
