use std::time::Duration;

use futures::Stream;

pub trait ResultExt {
    type Ok;
    #[track_caller]
    fn ok_or_log(self) -> Option<Self::Ok>;
}
impl<T, E: Into<anyhow::Error>> ResultExt for Result<T, E> {
    type Ok = T;
    #[track_caller]
    fn ok_or_log(self) -> Option<T> {
        match self {
            Ok(val) => Some(val),
            Err(err) => {
                log::error!("{:?}", err.into());
                None
            }
        }
    }
}

pub fn stream_from_fn<T>(f: impl AsyncFnMut() -> Option<T>) -> impl Stream<Item = T> {
    tokio_stream::StreamExt::filter_map(
        futures::stream::unfold(f, |mut f| async move { Some((f().await, f)) }),
        |it| it,
    )
}

/// Calls `f` until it succeeds, logging each failure and waiting `delay` in between.
pub async fn retry_forever<T>(
    delay: Duration,
    mut f: impl AsyncFnMut() -> anyhow::Result<T>,
) -> T {
    loop {
        if let Some(val) = f().await.ok_or_log() {
            break val;
        }
        tokio::time::sleep(delay).await;
    }
}
