use crate::focus::RenderRequester;
use async_trait::async_trait;
use ravel_core::{Error, Result};
use tokio::sync::{mpsc, oneshot};

/// Pending re-render; the host answers on `ack` once the frame is painted
pub(crate) type RenderRequest = oneshot::Sender<()>;

/// Forwards render requests from the focus manager to the host loop
#[derive(Debug, Clone)]
pub(crate) struct RenderChannel {
    tx: mpsc::Sender<RenderRequest>,
}

impl RenderChannel {
    pub(crate) fn new(capacity: usize) -> (Self, mpsc::Receiver<RenderRequest>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl RenderRequester for RenderChannel {
    async fn request_render(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(ack)
            .await
            .map_err(|_| Error::translation("host loop is not accepting render requests"))?;
        done.await
            .map_err(|_| Error::translation("host loop dropped a render request"))
    }
}
