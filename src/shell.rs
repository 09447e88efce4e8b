use std::collections::{BTreeMap, HashMap};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::fs;

use itertools::Itertools;
use serde::Deserialize;

use crate::ast::{self, Proposition, QUERY_MARKER};
use crate::error::BoxedErrorTrait;
use crate::prover::KnowledgeBase;

pub const CONFIG_FILE_PATH: &'static str = "config.toml";

const HELP: &'static str = "\
enter a fact (`A`) or a rule (`A&B>C`) to add it to the knowledge base
end a proposition with `?` to ask whether it can be derived (`C?`)
:eval <expr>   evaluate an expression against what can be derived
:nnf <expr>    rewrite an expression into negation normal form
:list          show every clause, in order
:stats         count facts and rules
:help          show this message
:quit          leave";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    prompt: String,
    log_level: String,
    echo_trace: bool,
    /// maps alternate spellings to the canonical operator symbols
    aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            prompt: "> ".to_string(),
            log_level: "warn".to_string(),
            echo_trace: false,
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Reads the config at `path`, or the defaults if there is no such file
    pub fn load(path: &Path) -> Result<Config, BoxedErrorTrait> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let buf = fs::read_to_string(path)?;
        let config = Config::from_toml(buf.as_str())?;
        Ok(config)
    }
    pub fn from_toml(source: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(source)
    }
    pub fn prompt(&self) -> &str { self.prompt.as_str() }
    pub fn log_level(&self) -> &str {
        if self.echo_trace { "debug" } else { self.log_level.as_str() }
    }
    /// The default aliases overlaid with the configured ones, longest first
    pub fn aliases(&self) -> Vec<(String, String)> {
        let mut merged = default_aliases();
        for (alias, symbol) in self.aliases.iter() {
            merged.insert(alias.clone(), symbol.clone());
        }
        merged.into_iter()
            .filter(|(alias, _)| !alias.is_empty())
            .sorted_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)))
            .collect()
    }
}

fn default_aliases() -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    aliases.insert("^".to_string(), "&".to_string());
    aliases.insert("v".to_string(), "|".to_string());
    aliases
}

/// `RUST_LOG` wins over the configured level
pub fn init_logging(config: &Config) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters(config.log_level()),
    };
    if let Err(why) = builder.try_init() {
        eprintln!("logging is unavailable: {}", why);
    }
}

/// Strip whitespace and rewrite aliases into the canonical symbols
pub fn clean(raw: &str, aliases: &[(String, String)]) -> String {
    let stripped = raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    aliases.iter()
        .fold(stripped, |text, (alias, symbol)| text.replace(alias.as_str(), symbol.as_str()))
}

#[derive(Debug, PartialEq, Eq)]
pub enum Response {
    Say(String),
    Quiet,
    Quit,
}

/// One interactive session over a knowledge base
pub struct Shell {
    knowledge: KnowledgeBase,
    aliases: Vec<(String, String)>,
    prompt: String,
}

impl Shell {
    pub fn new(config: &Config) -> Shell {
        Shell {
            knowledge: KnowledgeBase::new(),
            aliases: config.aliases(),
            prompt: config.prompt().to_string(),
        }
    }
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }
    /// Read lines from `input` until it runs out or the user quits
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write!(output, "{}", self.prompt)?;
        output.flush()?;
        for line in input.lines() {
            match self.execute(line?.as_str()) {
                Response::Say(message) => writeln!(output, "{}", message)?,
                Response::Quiet => {}
                Response::Quit => return Ok( () ),
            }
            write!(output, "{}", self.prompt)?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok( () )
    }
    pub fn execute(&mut self, line: &str) -> Response {
        let line = line.trim();
        if line.is_empty() {
            return Response::Quiet;
        }
        if line.starts_with(':') {
            let mut words = line[1..].splitn(2, char::is_whitespace);
            let command = words.next().unwrap_or("");
            let rest = words.next().unwrap_or("");
            return match command {
                "eval" => self.eval(rest),
                "nnf" => self.nnf(rest),
                "list" => Response::Say(self.knowledge.clauses().iter().join("\n")),
                "stats" => Response::Say(self.knowledge.stats().to_string()),
                "help" => Response::Say(HELP.to_string()),
                "quit" | "exit" => Response::Quit,
                other => {
                    warn!("unknown command `{}`", other);
                    Response::Say(format!("unknown command `:{}`, try `:help`", other))
                }
            };
        }
        let text = clean(line, &self.aliases);
        if text.ends_with(QUERY_MARKER) {
            self.ask(text.as_str())
        } else {
            self.tell(text.as_str())
        }
    }

    fn tell(&mut self, text: &str) -> Response {
        match self.knowledge.submit_clause(text) {
            Ok(()) => {
                info!("accepted `{}`", text);
                Response::Quiet
            }
            Err(why) => {
                warn!("rejected clause `{}`: {}", text, why);
                Response::Say(format!("rejected `{}`: {}", text, why))
            }
        }
    }
    fn ask(&self, text: &str) -> Response {
        match self.knowledge.query(text) {
            Ok(true) => {
                info!("{} holds", text);
                Response::Say(format!("yes: `{}` can be derived", text.trim_end_matches(QUERY_MARKER)))
            }
            Ok(false) => {
                info!("{} does not hold", text);
                Response::Say(format!("no: `{}` can not be derived", text.trim_end_matches(QUERY_MARKER)))
            }
            Err(why) => {
                warn!("rejected query `{}`: {}", text, why);
                Response::Say(format!("rejected `{}`: {}", text, why))
            }
        }
    }
    fn eval(&self, raw: &str) -> Response {
        let source = clean(raw, &self.aliases);
        let expression = match ast::parse_expression(source.as_str()) {
            Ok(expression) => expression,
            Err(why) => return Response::Say(format!("rejected `{}`: {}", source, why)),
        };
        let assignment = expression.propositions()
            .map(|p| self.knowledge.prove(p).map(|truth| (p, truth)))
            .collect::<Result<HashMap<Proposition, bool>, _>>();
        let value = assignment.and_then(|assignment| expression.evaluate(&assignment));
        match value {
            Ok(value) => Response::Say(format!("{} = {}", expression, if value { "T" } else { "F" })),
            Err(why) => {
                error!("evaluating `{}`: {}", expression, why);
                Response::Say(format!("could not evaluate `{}`: {}", expression, why))
            }
        }
    }
    fn nnf(&self, raw: &str) -> Response {
        let source = clean(raw, &self.aliases);
        let tree = ast::parse_expression(source.as_str())
            .map_err(|why| why.to_string())
            .and_then(|expression| expression.to_tree().map_err(|why| why.to_string()));
        match tree {
            Ok(tree) => Response::Say(tree.normalize_negations().to_string()),
            Err(why) => Response::Say(format!("rejected `{}`: {}", source, why)),
        }
    }
}
