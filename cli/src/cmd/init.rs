use std::path::PathBuf;

use cft_core::action;

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let path = action::init_config_file(&args.dir)?;
    global_args.console().success(format!(
        "Created {}",
        util::replace_homedir_to_tilde(path).to_string_lossy()
    ));
    Ok(())
}
