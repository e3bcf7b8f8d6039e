// Copyright (c) ZeroC, Inc.

use decafc::clap::Parser;
use decafc::options::CompilerOptions;

pub fn main() {
    let options = CompilerOptions::parse();
    let state = decafc::compile_from_options(&options);
    std::process::exit(state.into_exit_code(&options));
}
