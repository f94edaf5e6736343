//! REST backend for a browser task list.
//!
//! Tasks are stored through a [`db::TaskStore`], orchestrated by
//! [`services::TaskService`] and served over HTTP by [`api::app`]. Every
//! task returned to a client carries a [`models::TaskStatus`] derived at
//! read time from its deadline and the service clock.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
