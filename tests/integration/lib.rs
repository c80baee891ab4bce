
pub(crate) use counter_app::*;

mod dispatch_facade_tests;
mod hook_order_tests;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
