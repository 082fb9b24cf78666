pub mod auto_advance;
pub mod carousel;
pub mod catalog;
pub mod cyclic;
pub mod events;
pub mod item;
pub mod marquee;
pub mod slider;
pub mod stats;
pub mod viewer;

pub use auto_advance::{AutoAdvance, AutoAdvanceTick};
pub use carousel::{Carousel, CarouselState};
pub use catalog::{BeforeAfter, Catalog, Section};
pub use cyclic::CyclicIndex;
pub use events::{EventSink, MediaEvent};
pub use item::{Item, ItemFilter, ItemList, ALL_CATEGORIES};
pub use marquee::{frame_interval, FrameLoop, Marquee, MarqueeState};
pub use slider::{clip_extent, ComparisonSlider};
pub use stats::TestimonialStats;
pub use viewer::{KeyOutcome, ModalViewer, ModalViewerState, ViewerKey};
