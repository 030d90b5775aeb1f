//! Hash record types.
//!
//! - [`HashRecord`] - A parsed hash string (`[!1] [#id] {segment}+ {hash}`)
//! - [`ChainSegment`] - One `{algorithm-id}:{iterations}:{base64-salt}` step

mod record;
mod segment;

pub use record::HashRecord;
pub use segment::ChainSegment;
