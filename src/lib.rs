// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Anketa — editable-profile core for a learning platform.
//!
//! Per-field edit state machines, draft accumulation, and asynchronous save
//! coordination behind a page-level aggregate. Persistence is delegated to a
//! `ProfileClient` capability; presentation is reduced to a plain-text renderer.

pub mod client;
pub mod draft;
pub mod machine;
pub mod model;
pub mod page;
pub mod render;
pub mod save;
