#![allow(dead_code)]
use log::LevelFilter;
use stencil::{AsValue, Prepared, Result, Value};
use std::{collections::BTreeMap, env};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Records what a driver would receive.
#[derive(Default, Debug)]
pub struct RecordingPrepared {
    pub values: BTreeMap<u64, Value>,
}

impl RecordingPrepared {
    pub fn values(&self) -> Vec<Value> {
        self.values.values().cloned().collect()
    }
}

impl Prepared for RecordingPrepared {
    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        self.values.insert(index, value.as_value());
        Ok(self)
    }
    fn clear_bindings(&mut self) -> Result<&mut Self> {
        self.values.clear();
        Ok(self)
    }
}
