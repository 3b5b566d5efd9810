use crate::domain::errors::{AppError, NetworkResult};
use crate::domain::import::{ProgressEvent, decode_progress_frame};
use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use crate::infrastructure::http::ws_base;
use futures::StreamExt;
use futures::future::{AbortHandle, Abortable};
use gloo_net::websocket::{Message, futures::WebSocket};
use wasm_bindgen_futures::spawn_local;

/// Path the backend publishes import progress on
pub const PROGRESS_CHANNEL_PATH: &str = "/ws/excel-progress";

fn progress_channel_url() -> String {
    format!("{}{}", ws_base(), PROGRESS_CHANNEL_PATH)
}

/// One-directional WebSocket subscription for import progress frames.
///
/// At most one socket is live per channel: `open` tears down the previous
/// reader before connecting. Malformed frames are dropped with a debug log,
/// transport errors end the stream without reconnecting. Dropping the
/// channel (or the aborted reader future) closes the underlying socket.
pub struct ProgressChannel {
    reader: Option<AbortHandle>,
}

impl ProgressChannel {
    pub fn new() -> Self {
        Self { reader: None }
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Connect and forward every well-formed frame to `on_event`
    pub fn open<F>(&mut self, mut on_event: F) -> NetworkResult<()>
    where
        F: FnMut(ProgressEvent) + 'static,
    {
        self.close();

        let url = progress_channel_url();
        let mut socket = WebSocket::open(&url)
            .map_err(|e| AppError::NetworkError(format!("Progress socket failed: {e:?}")))?;
        get_logger().info(
            LogComponent::Infrastructure("ProgressChannel"),
            &format!("🔌 Listening for import progress at {url}"),
        );

        let (handle, registration) = AbortHandle::new_pair();
        let reader = async move {
            while let Some(message) = socket.next().await {
                match message {
                    Ok(Message::Text(raw)) => match decode_progress_frame(&raw) {
                        Some(event) => on_event(event),
                        None => get_logger().log_with_metadata(
                            LogLevel::Debug,
                            LogComponent::Infrastructure("ProgressChannel"),
                            "Dropped malformed progress frame",
                            &raw,
                        ),
                    },
                    Ok(Message::Bytes(_)) => get_logger().debug(
                        LogComponent::Infrastructure("ProgressChannel"),
                        "Ignoring binary progress frame",
                    ),
                    Err(e) => {
                        get_logger().warn(
                            LogComponent::Infrastructure("ProgressChannel"),
                            &format!("🔌 Progress socket error: {e:?}"),
                        );
                        break;
                    }
                }
            }
            get_logger().debug(
                LogComponent::Infrastructure("ProgressChannel"),
                "Progress reader stopped",
            );
        };
        spawn_local(async move {
            // Aborting drops the socket mid-await, which closes it
            let _ = Abortable::new(reader, registration).await;
        });
        self.reader = Some(handle);
        Ok(())
    }

    /// Stop the reader and close the socket. Safe to call when idle.
    pub fn close(&mut self) {
        if let Some(handle) = self.reader.take() {
            handle.abort();
            get_logger().debug(
                LogComponent::Infrastructure("ProgressChannel"),
                "Progress channel closed",
            );
        }
    }
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressChannel {
    fn drop(&mut self) {
        self.close();
    }
}
