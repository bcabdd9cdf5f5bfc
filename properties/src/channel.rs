use crate::listener::ChangeListener;

/// A single change as delivered to channel listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    pub old: T,
    pub new: T,
}

// Send errors only mean the receiver is gone, so they are ignored

impl<T> From<std::sync::mpsc::Sender<Change<T>>> for ChangeListener<T>
where T: Clone + Send + 'static
{
    fn from(sender: std::sync::mpsc::Sender<Change<T>>) -> Self {
        ChangeListener::new(move |_, old: &T, new: &T| {
            let _ = sender.send(Change { old: old.clone(), new: new.clone() });
        })
    }
}

#[cfg(feature = "tokio")]
impl<T> From<tokio::sync::mpsc::UnboundedSender<Change<T>>> for ChangeListener<T>
where T: Clone + Send + 'static
{
    fn from(sender: tokio::sync::mpsc::UnboundedSender<Change<T>>) -> Self {
        ChangeListener::new(move |_, old: &T, new: &T| {
            let _ = sender.send(Change { old: old.clone(), new: new.clone() });
        })
    }
}
