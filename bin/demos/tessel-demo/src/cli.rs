// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tessel-demo")]
#[command(about = "Analyse a dataset, suggest dashboard layouts and edit the placed visuals")]
#[command(version)]
pub struct Args {
    #[arg(long, help = "JSON array of row objects; a bundled sales sample is used when omitted")]
    pub dataset: Option<PathBuf>,

    #[arg(long, help = "Engine configuration YAML")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Per-visual-type defaults YAML")]
    pub visual_defaults: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "executive", help = "Layout style to apply")]
    pub layout: StyleArg,

    #[arg(long, help = "Print the placed visuals as JSON")]
    pub json: bool,

    #[arg(long, value_enum, help = "Set the logging level")]
    pub log_level: Option<LogLevel>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum StyleArg {
    Executive,
    Detailed,
    Compact,
    Presentation,
}

impl StyleArg {
    pub fn layout_id(&self) -> &'static str {
        match self {
            StyleArg::Executive => "layout-executive",
            StyleArg::Detailed => "layout-detailed",
            StyleArg::Compact => "layout-compact",
            StyleArg::Presentation => "layout-presentation",
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
