//! TickerDeck Core — domain types, ledger, P/L accounting, providers.
//!
//! This crate is the UI-free heart of the dashboard:
//! - Domain types (quotes, quote series, trade records)
//! - Paper-trading ledger with solvency and share-availability invariants
//! - Position accounting (per-trade and replayed net P/L) and verdicts
//! - Quote provider trait, Yahoo Finance client, TTL cache
//! - News source trait, NewsAPI client, lexicon sentiment scorer
//! - Symbol cleanup, aliases, and regional resolution
//! - Config loading and the injected login collaborator

pub mod auth;
pub mod config;
pub mod data;
pub mod domain;
pub mod evaluation;
pub mod ledger;
pub mod news;
pub mod pnl;
pub mod range;
pub mod sentiment;
pub mod symbol;
