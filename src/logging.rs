// Copyright (C) 2021  Braiins Systems s.r.o.
//
// This file is part of Braiins Open-Source Initiative (BOSI).
//
// BOSI is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// Please, keep in mind that we may also license BOSI or any part thereof
// under a proprietary license. For more information on the terms and conditions
// of such proprietary license or if you have any other questions, please
// contact us at opensource@braiins.com.

//! Logging boilerplate for a library crate: a single process-global `slog` async drain,
//! installed lazily on first use and reused by every module via [`logger()`].
//!
//! Unlike a standalone daemon this crate has no configuration to load and no file target to
//! rotate, so there's no `LoggingConfig`/`LoggingTarget` here — just the drain chain and the
//! `lazy_static`-guarded singleton.

use lazy_static::lazy_static;
use slog::{o, Drain};
use std::sync::Mutex;

pub use slog::Logger;

lazy_static! {
    static ref LOGGER: Mutex<Option<Logger>> = Mutex::new(None);
}

fn build_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_envlogger::new(drain);
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!())
}

/// Returns a handle to the shared logger, building it on first call. Cloning a `Logger` is
/// cheap (it's a thin `Arc` handle), so callers are expected to call this on demand rather than
/// caching it themselves.
pub fn logger() -> Logger {
    let mut guard = LOGGER.lock().expect("logger mutex poisoned");
    if guard.is_none() {
        *guard = Some(build_logger());
    }
    guard.as_ref().expect("just initialized").clone()
}
