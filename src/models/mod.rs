// Domain models: memory snapshot and decoded display identification

mod display;
mod memory;

pub use display::{
    Descriptor, DescriptorBlock, DetailedTiming, DisplayDescriptor, RangeLimits, TextKind,
};
pub use memory::MemorySnapshot;
