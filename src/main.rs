// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use coffee_shop_env::{
    logging::{init_logging, LogFormat},
    Environment,
};

fn main() -> ExitCode {
    init_logging(LogFormat::from_env());

    // Render the validated environment for the client build to embed
    let rendered = Environment::from_env().and_then(|env| env.to_json_pretty());
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, error_code = e.error_code(), "Invalid client environment");
            ExitCode::FAILURE
        }
    }
}
