use futures_util::{Stream, StreamExt};
use gloo_timers::future::IntervalStream;

pub const TICK_INTERVAL_MILLIS: u32 = 1000;

/// Call `on_tick` once per second until it returns `false`.
///
/// Intended to be spawned while a rest timer is running:
///
/// ```ignore
/// wasm_bindgen_futures::spawn_local(ticker::run(move || {
///     if let Ok(beeps) = training_session::update(Msg::Tick, &mut model, &mut exercises) {
///         play(&beeps);
///     }
///     model.rest_timer().is_active()
/// }));
/// ```
pub async fn run(on_tick: impl FnMut() -> bool) {
    drive(IntervalStream::new(TICK_INTERVAL_MILLIS), on_tick).await;
}

/// Call `on_tick` for every item of `ticks` until it returns `false`. Returns the number of
/// ticks handled.
pub async fn drive(ticks: impl Stream<Item = ()>, mut on_tick: impl FnMut() -> bool) -> usize {
    let mut ticks = std::pin::pin!(ticks);
    let mut count = 0;
    while ticks.next().await.is_some() {
        count += 1;
        if !on_tick() {
            break;
        }
    }
    count
}
