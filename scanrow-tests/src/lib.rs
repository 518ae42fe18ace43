mod arrays;
mod failures;
#[cfg(not(feature = "disable-geometry"))]
mod geometry;
mod single;
mod timestamps;
#[cfg(not(feature = "disable-transactions"))]
mod transactions;
mod users;

use arrays::arrays;
use failures::failures;
#[cfg(not(feature = "disable-geometry"))]
use geometry::geometry;
use log::LevelFilter;
use scanrow::{Connection, Session};
use single::single;
use std::env;
use timestamps::timestamps;
#[cfg(not(feature = "disable-transactions"))]
use transactions::transactions;
use users::users;

#[doc(hidden)]
pub use log;

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

pub async fn execute_tests<C: Connection>(connection: C) {
    let mut session = Session::new(connection);
    users(&mut session).await;
    arrays(&mut session).await;
    timestamps(&mut session).await;
    #[cfg(not(feature = "disable-geometry"))]
    geometry(&mut session).await;
    single(&mut session).await;
    #[cfg(not(feature = "disable-transactions"))]
    transactions(&mut session).await;
    failures(&mut session).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = $crate::log::max_level();
        $crate::log::set_max_level($crate::log::LevelFilter::Off);
        $($code)+
        $crate::log::set_max_level(level);
    }};
}
