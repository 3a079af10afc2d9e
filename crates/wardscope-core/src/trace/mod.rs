//! Scrolling trace rendering
//!
//! One renderer instance per monitor channel. Each renderer owns a wrapping
//! horizontal cursor over a persistent draw surface and paints a narrow
//! erase-and-redraw slice per frame, which leaves the older trace on screen
//! behind the moving cursor the way a strip-chart monitor does.

pub mod channel;
pub mod renderer;
pub mod scheduler;
pub mod surface;

pub use channel::{TraceChannel, TraceColor};
pub use renderer::{TraceRenderer, SAMPLE_EPSILON_SECS};
pub use scheduler::{FrameFn, FrameLoopHandle, FrameScheduler, ManualScheduler, TokioScheduler};
pub use surface::{DrawSurface, PixelSurface};
