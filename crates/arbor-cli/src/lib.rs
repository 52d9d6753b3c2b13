//! # arbor-cli
//!
//! `arboradm`, the administrative client of the arbor configuration tree.
//!
//! Provides commands for:
//! - Flat entities (environments, views, modes, predicates, providers)
//! - Property definitions and attaching them to tree objects
//! - Repositories, buckets, groups, clusters and nodes
//! - Users, teams, oncall duties and permissions
//! - Check configurations
//!
//! # Architecture
//!
//! A command line is a verb path followed by arguments. The
//! [`registry`] maps the verb path to a [`commands::Action`]; the action
//! parses the arguments with the keyword parser in [`args`], validates
//! them, resolves names to identifiers through a [`lookup::Lookup`] and
//! yields a [`request::RequestDescriptor`]. [`dispatch`] sends it with a
//! [`client::Transport`] and hands the result to [`OutputFormat`].
//!
//! ```text
//! tokens ─► registry ─► action ─► descriptor ─► transport ─► output
//!                         │
//!                         └─► lookup (search requests)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod args;
pub mod cli;
pub mod client;
pub mod commands;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod lookup;
pub mod output;
pub mod registry;
pub mod request;
pub mod resolve;

pub use cli::{Cli, Format};
pub use client::{ApiClient, Transport};
pub use config::Config;
pub use error::CliError;
pub use output::OutputFormat;
pub use request::RequestDescriptor;
