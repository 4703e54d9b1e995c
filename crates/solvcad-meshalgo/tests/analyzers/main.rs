use std::iter::FromIterator;
use solvcad_meshalgo::prelude::*;

mod collision;
mod point_cloud;
mod splitting;
mod topology;
