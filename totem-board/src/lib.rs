//! Transit departure board server.
//!
//! A web page that answers: "when is the next bus or tram at my stop?"
//! Pick a line, a direction and a stop of the Divia network to see the
//! next departures there, refreshed every few seconds, and star stops to
//! keep their departures on the page.

pub mod board;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod favorites;
pub mod polling;
pub mod selection;
pub mod storage;
pub mod web;
