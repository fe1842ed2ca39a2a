//! Seams between the request pipeline and the outside world.

mod clock;
mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use transport::Transport;
