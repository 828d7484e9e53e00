//! Task spawning and timers for native and browser targets

use std::future::Future;
use std::time::Duration;

/// `Send` on native targets, no bound in the browser
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// Run a future in the background
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Longest delay a browser timer honours; larger values fire immediately
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(2_147_483_647); // i32::MAX

/// Split a delay into consecutive timer waits no longer than [`MAX_TIMER_DELAY`]
fn timer_chunks(total: Duration) -> impl Iterator<Item = Duration> {
    let mut remaining = total;
    std::iter::from_fn(move || {
        if remaining.is_zero() {
            return None;
        }
        let chunk = remaining.min(MAX_TIMER_DELAY);
        remaining -= chunk;
        Some(chunk)
    })
}

/// Wait for the given duration
pub async fn sleep(duration: Duration) {
    for chunk in timer_chunks(duration) {
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(chunk).await;

        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(chunk).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_delay_is_one_timer() {
        let chunks: Vec<_> = timer_chunks(Duration::from_secs(90)).collect();
        assert_eq!(chunks, vec![Duration::from_secs(90)]);
        assert_eq!(timer_chunks(Duration::ZERO).count(), 0);
    }

    #[test]
    fn test_long_delay_is_split_under_timer_limit() {
        // a refresh token lifetime of 60 days
        let total = Duration::from_secs(60 * 24 * 60 * 60);
        let chunks: Vec<_> = timer_chunks(total).collect();

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| *chunk <= MAX_TIMER_DELAY));
        assert_eq!(chunks.iter().sum::<Duration>(), total);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_waits_full_duration() {
        let start = tokio::time::Instant::now();
        sleep(MAX_TIMER_DELAY + Duration::from_secs(5)).await;
        assert!(start.elapsed() >= MAX_TIMER_DELAY + Duration::from_secs(5));
    }
}
