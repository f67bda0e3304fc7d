#![allow(dead_code)]

pub mod release_server;
