//! Defines all the messages supported by the token transfer application.

pub mod transfer;
