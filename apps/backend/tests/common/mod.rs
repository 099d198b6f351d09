#![allow(dead_code)]

pub mod proptest_prelude;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}
