#![allow(dead_code)]

pub mod external_server;
pub mod match_server;
