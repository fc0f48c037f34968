//! Extension traits

mod depot;
mod money;
mod point_in_time;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use money::AmountExt as _;
pub(crate) use point_in_time::PointInTimeExt as _;
pub(crate) use result::ResultExt as _;
