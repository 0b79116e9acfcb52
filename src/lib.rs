// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod utils;
pub mod validation;
