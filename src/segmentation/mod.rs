pub mod segmenter;

pub use segmenter::{
    segment,
    SegmentedRecord,
};
