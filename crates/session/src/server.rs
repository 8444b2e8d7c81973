use std::future::Future;

use services::QuizService;
use tokio::io::BufReader;
use tokio::net::TcpListener;

use crate::channel::LineChannel;
use crate::output::Style;
use crate::session::{SessionEnd, run_session};

/// Accept clients until `shutdown` resolves, one task per connection.
///
/// Sessions share nothing but the `QuizService`. Sessions still running when
/// `shutdown` fires are left to finish on their own.
///
/// # Errors
///
/// Returns the I/O error if the listener's local address cannot be read.
pub async fn serve<F>(
    listener: TcpListener,
    service: QuizService,
    style: Style,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    tracing::info!(addr = %listener.local_addr()?, "listening for quiz clients");
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        tracing::error!(%err, "accept failed");
                        continue;
                    }
                };
                if let Err(err) = stream.set_nodelay(true) {
                    tracing::debug!(%peer, %err, "could not disable nagle");
                }

                let service = service.clone();
                tokio::spawn(async move {
                    tracing::info!(%peer, "client connected");
                    let (read, write) = stream.into_split();
                    let channel = LineChannel::new(BufReader::new(read), write, style, false);
                    match run_session(channel, &service).await {
                        Ok(SessionEnd::Quit) => tracing::info!(%peer, "client quit"),
                        Ok(SessionEnd::Disconnected) => tracing::info!(%peer, "client disconnected"),
                        Ok(SessionEnd::LineTooLong) => tracing::info!(%peer, "client cut off"),
                        Err(err) => tracing::warn!(%peer, %err, "session ended with transport error"),
                    }
                });
            }
            () = &mut shutdown => {
                tracing::info!("shutting down quiz server");
                return Ok(());
            }
        }
    }
}
