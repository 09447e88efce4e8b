use std::io;
use std::path::PathBuf;

use backward_chainer::shell::{self, Config, Shell};

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(shell::CONFIG_FILE_PATH));
    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(why) => {
            eprintln!("could not load {}: {}", path.display(), why);
            return;
        }
    };
    shell::init_logging(&config);

    let mut shell = Shell::new(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(why) = shell.run(stdin.lock(), stdout.lock()) {
        eprintln!("{}", why);
    }
}
