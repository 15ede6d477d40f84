//! elastic-trib: Elasticsearch cluster command line utility
//!
//! A library for inspecting an Elasticsearch cluster over its REST API and
//! for managing the node allocation exclusion list
//! (`cluster.routing.allocation.exclude._ip`).

pub mod allocation;
pub mod audit;
pub mod commands;
pub mod config;
pub mod transport;
