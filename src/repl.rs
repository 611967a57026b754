//! Line-oriented command interpreter.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use stars_catalog::{Catalog, Coords, Point, ReaderConfig, read_catalog};
use stars_knn::{SearchConfig, SearchResult, SearchScratch, nearest_neighbors_with_scratch};
use tracing::{debug, info, info_span, warn};

use crate::cli::ReplArgs;
use crate::config::StarsConfig;

/// Builds the tie-break RNG from an optional seed.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// A parsed interpreter command.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    /// `stars <path>`
    Load(PathBuf),
    /// `naive_neighbors <k> <x> <y> <z>`
    NeighborsAt { k: usize, coords: Coords },
    /// `naive_neighbors <k> "<name>"`
    NeighborsOf { k: usize, name: String },
    /// `add <a> <b>`
    Add(f64, f64),
    /// `subtract <a> <b>`
    Subtract(f64, f64),
}

/// Splits a line on whitespace, keeping double-quoted text as one token.
///
/// Quotes are stripped. An unterminated quote is an error.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        bail!("unterminated quote");
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_k(token: &str) -> Result<usize> {
    let k: i64 = token
        .parse()
        .with_context(|| format!("k must be an integer, got {token:?}"))?;
    if k < 0 {
        bail!("k must be non-negative, got {k}");
    }
    usize::try_from(k).with_context(|| format!("k is too large: {k}"))
}

fn parse_number(token: &str, what: &str) -> Result<f64> {
    token
        .parse()
        .with_context(|| format!("{what} must be a number, got {token:?}"))
}

fn parse_command(tokens: &[String]) -> Result<ReplCommand> {
    let Some((cmd, args)) = tokens.split_first() else {
        bail!("empty command");
    };

    match (cmd.as_str(), args) {
        ("stars", [path]) => Ok(ReplCommand::Load(PathBuf::from(path))),
        ("stars", _) => bail!("usage: stars <path>"),
        ("naive_neighbors", [k, x, y, z]) => Ok(ReplCommand::NeighborsAt {
            k: parse_k(k)?,
            coords: [
                parse_number(x, "x")?,
                parse_number(y, "y")?,
                parse_number(z, "z")?,
            ],
        }),
        ("naive_neighbors", [k, name]) => {
            if name.is_empty() {
                bail!("star name must not be empty");
            }
            Ok(ReplCommand::NeighborsOf {
                k: parse_k(k)?,
                name: name.clone(),
            })
        }
        ("naive_neighbors", _) => {
            bail!("usage: naive_neighbors <k> <x> <y> <z> | naive_neighbors <k> \"<name>\"")
        }
        ("add", [a, b]) => Ok(ReplCommand::Add(parse_number(a, "a")?, parse_number(b, "b")?)),
        ("subtract", [a, b]) => Ok(ReplCommand::Subtract(
            parse_number(a, "a")?,
            parse_number(b, "b")?,
        )),
        ("add" | "subtract", _) => bail!("usage: {cmd} <a> <b>"),
        (other, _) => bail!("unrecognized command: {other}"),
    }
}

/// Writes one line per neighbor: `<id>\t<label>\t<distance>`.
pub fn write_neighbors(out: &mut impl Write, result: &SearchResult<'_>) -> Result<()> {
    for n in result {
        let p = n.point();
        writeln!(out, "{}\t{}\t{}", p.id(), p.label(), n.distance())?;
    }
    Ok(())
}

/// Interpreter state: the loaded catalog and the search settings.
pub struct Session {
    catalog: Option<Catalog>,
    reader_config: ReaderConfig,
    epsilon: f64,
    rng: StdRng,
    scratch: SearchScratch,
}

impl Session {
    /// Creates a session with no catalog loaded.
    pub fn new(config: &StarsConfig, rng: StdRng) -> Self {
        Self {
            catalog: None,
            reader_config: config.reader_config(),
            epsilon: config.search.tie_epsilon,
            rng,
            scratch: SearchScratch::default(),
        }
    }

    /// Loads a catalog, replacing any previously loaded one.
    ///
    /// Returns the number of points read. On failure the previous catalog
    /// stays loaded.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let catalog = read_catalog(path, &self.reader_config)
            .with_context(|| format!("failed to read catalog: {}", path.display()))?;
        let n = catalog.len();
        self.catalog = Some(catalog);
        Ok(n)
    }

    /// Writes the `k` stars nearest to `coords`.
    pub fn neighbors_at(&mut self, k: usize, coords: &Coords, out: &mut impl Write) -> Result<()> {
        let catalog = self
            .catalog
            .as_ref()
            .context("no catalog loaded; use `stars <path>` first")?;
        let candidates = catalog.candidates();
        let config = SearchConfig::new(k).with_epsilon(self.epsilon);
        let result = nearest_neighbors_with_scratch(
            &candidates,
            coords,
            &config,
            &mut self.rng,
            &mut self.scratch,
        )?;
        debug!(k, ?coords, n_drawn = result.drawn().len(), "query by coordinates");
        write_neighbors(out, &result)
    }

    /// Writes the `k` stars nearest to the star labeled `name`, excluding it.
    pub fn neighbors_of(&mut self, k: usize, name: &str, out: &mut impl Write) -> Result<()> {
        let catalog = self
            .catalog
            .as_ref()
            .context("no catalog loaded; use `stars <path>` first")?;
        let Some((index, star)) = catalog.find_by_label(name) else {
            bail!("no star named {name:?}");
        };
        let candidates: Vec<&Point> = catalog.candidates_excluding(index);
        let config = SearchConfig::new(k).with_epsilon(self.epsilon);
        let result = nearest_neighbors_with_scratch(
            &candidates,
            star.coords(),
            &config,
            &mut self.rng,
            &mut self.scratch,
        )?;
        debug!(k, name, n_drawn = result.drawn().len(), "query by name");
        write_neighbors(out, &result)
    }

    /// Parses and runs one input line, writing its output to `out`.
    ///
    /// Blank lines do nothing.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<()> {
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(());
        }

        match parse_command(&tokens)? {
            ReplCommand::Load(path) => {
                let n = self.load(&path)?;
                info!(path = %path.display(), n, "catalog replaced");
                writeln!(out, "Read {n} stars from {}", path.display())?;
            }
            ReplCommand::NeighborsAt { k, coords } => self.neighbors_at(k, &coords, out)?,
            ReplCommand::NeighborsOf { k, name } => self.neighbors_of(k, &name, out)?,
            ReplCommand::Add(a, b) => writeln!(out, "{}", a + b)?,
            ReplCommand::Subtract(a, b) => writeln!(out, "{}", a - b)?,
        }
        Ok(())
    }

    /// Runs commands from `input` until EOF.
    ///
    /// A failing command prints `ERROR: <message>` and the loop continues;
    /// only I/O failures on `input`/`out` end it early.
    pub fn run_loop(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read input line")?;
            if let Err(e) = self.execute(&line, out) {
                warn!(line = %line.trim(), "command failed: {e:#}");
                writeln!(out, "ERROR: {e:#}")?;
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Run the interactive interpreter on stdin/stdout.
pub fn run(args: ReplArgs) -> Result<()> {
    let _cmd = info_span!("repl").entered();
    let config = StarsConfig::load(args.config.as_deref())?;
    let rng = make_rng(args.seed.or(config.seed));
    let mut session = Session::new(&config, rng);

    if let Some(path) = args.catalog.as_ref().or(config.catalog.path.as_ref()) {
        let n = session.load(path)?;
        info!(path = %path.display(), n, "catalog preloaded");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run_loop(stdin.lock(), &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TEN_STARS: &str = "StarID,ProperName,X,Y,Z\n\
        0,Sol,0,0,0\n\
        1,Andreas,282.43485,0.00449,5.36884\n\
        2,Rory,43.04329,0.00285,-15.24144\n\
        3,Mortimer,277.11358,0.02422,223.27753\n\
        3759,96 G. Psc,7.26388,1.55643,0.68697\n\
        70667,Proxima Centauri,-0.47175,-0.36132,-1.15037\n\
        71454,Rigel Kentaurus B,-0.50359,-0.42128,-1.1767\n\
        71457,Rigel Kentaurus A,-0.50362,-0.42139,-1.17665\n\
        87666,Barnard's Star,-0.01729,-1.81533,0.14824\n\
        118721,,-2.28262,0.64697,0.29354\n";

    fn session() -> Session {
        Session::new(&StarsConfig::default(), StdRng::seed_from_u64(0))
    }

    fn write_catalog(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("stars.csv");
        std::fs::write(&path, contents).expect("write catalog");
        path
    }

    /// Runs `script` through a fresh session and returns the output lines.
    fn run_script(session: &mut Session, script: &str) -> Vec<String> {
        let mut out = Vec::new();
        session
            .run_loop(Cursor::new(script.to_string()), &mut out)
            .expect("run loop");
        String::from_utf8(out)
            .expect("utf-8 output")
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn ids(lines: &[String]) -> Vec<&str> {
        lines
            .iter()
            .map(|l| l.split('\t').next().unwrap_or(""))
            .collect()
    }

    #[test]
    fn tokenize_plain_and_quoted() {
        assert_eq!(
            tokenize("naive_neighbors  5 \"Rigel Kentaurus A\"").unwrap(),
            vec!["naive_neighbors", "5", "Rigel Kentaurus A"]
        );
        assert_eq!(tokenize("   ").unwrap(), Vec::<String>::new());
        assert_eq!(tokenize("a \"\" b").unwrap(), vec!["a", "", "b"]);
        assert!(tokenize("naive_neighbors 1 \"Sol").is_err());
    }

    #[test]
    fn parse_commands() {
        let parse = |s: &str| parse_command(&tokenize(s).unwrap());
        assert_eq!(
            parse("stars data/stars.csv").unwrap(),
            ReplCommand::Load(PathBuf::from("data/stars.csv"))
        );
        assert_eq!(
            parse("naive_neighbors 3 1 -2 0.5").unwrap(),
            ReplCommand::NeighborsAt {
                k: 3,
                coords: [1.0, -2.0, 0.5]
            }
        );
        assert_eq!(
            parse("naive_neighbors 2 \"Sol\"").unwrap(),
            ReplCommand::NeighborsOf {
                k: 2,
                name: "Sol".to_string()
            }
        );
        assert_eq!(parse("add 2 3").unwrap(), ReplCommand::Add(2.0, 3.0));
        assert_eq!(parse("subtract 2 3").unwrap(), ReplCommand::Subtract(2.0, 3.0));
    }

    #[test]
    fn parse_errors() {
        let parse = |s: &str| parse_command(&tokenize(s).unwrap());
        let msg = |s: &str| format!("{:#}", parse(s).unwrap_err());
        assert!(msg("naive_neighbors -1 0 0 0").contains("non-negative"));
        assert!(msg("naive_neighbors two 0 0 0").contains("integer"));
        assert!(msg("naive_neighbors 1 0 zero 0").contains("y must be a number"));
        assert!(msg("naive_neighbors 1 0 0").contains("usage"));
        assert!(msg("naive_neighbors 1 \"\"").contains("must not be empty"));
        assert!(msg("stars").contains("usage"));
        assert!(msg("add 1").contains("usage: add"));
        assert!(msg("frobnicate").contains("unrecognized command: frobnicate"));
    }

    #[test]
    fn query_before_load_is_an_error() {
        let mut s = session();
        let lines = run_script(&mut s, "naive_neighbors 1 0 0 0\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR: no catalog loaded"));
    }

    #[test]
    fn load_and_query_by_coordinates() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), TEN_STARS);
        let mut s = session();

        let script = format!("stars {}\nnaive_neighbors 3 0 0 0\n", path.display());
        let lines = run_script(&mut s, &script);

        assert_eq!(lines[0], format!("Read 10 stars from {}", path.display()));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "0\tSol\t0");
        assert_eq!(ids(&lines[2..3]), vec!["70667"]);
        // The two Rigel Kentaurus components are tied at rank 2.
        assert!(["71454", "71457"].contains(&ids(&lines[3..])[0]));
    }

    #[test]
    fn query_by_name_excludes_the_star() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), TEN_STARS);
        let mut s = session();
        s.load(&path).unwrap();

        let lines = run_script(&mut s, "naive_neighbors 1 \"Sol\"\n");
        assert_eq!(ids(&lines), vec!["70667"]);

        // Every star can be queried with k = n - 1 without finding itself.
        let lines = run_script(&mut s, "naive_neighbors 9 \"Rigel Kentaurus A\"\n");
        assert_eq!(lines.len(), 9);
        assert!(!ids(&lines).contains(&"71457"));
    }

    #[test]
    fn query_by_name_prints_distances() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), "0,Sol,0,0,0\n1,Vega,3,4,0\n");
        let mut s = session();
        s.load(&path).unwrap();

        let lines = run_script(&mut s, "naive_neighbors 1 Sol\n");
        assert_eq!(lines, vec!["1\tVega\t5"]);
    }

    #[test]
    fn lookup_does_not_shrink_catalog() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), TEN_STARS);
        let mut s = session();
        s.load(&path).unwrap();

        let _ = run_script(&mut s, "naive_neighbors 1 \"Sol\"\n");
        let lines = run_script(&mut s, "naive_neighbors 10 0 0 0\n");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), TEN_STARS);
        let mut s = session();
        s.load(&path).unwrap();

        let script = "naive_neighbors 11 0 0 0\n\
                      naive_neighbors 1 \"Nobody\"\n\
                      \n\
                      add 2 3\n";
        let lines = run_script(&mut s, script);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ERROR: k must be <= 10"));
        assert_eq!(lines[1], "ERROR: no star named \"Nobody\"");
        assert_eq!(lines[2], "5");
    }

    #[test]
    fn k_zero_prints_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), TEN_STARS);
        let mut s = session();
        s.load(&path).unwrap();

        let lines = run_script(&mut s, "naive_neighbors 0 1 1 1\nsubtract 1 3\n");
        assert_eq!(lines, vec!["-2"]);
    }

    #[test]
    fn failed_load_keeps_previous_catalog() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(dir.path(), TEN_STARS);
        let mut s = session();
        s.load(&path).unwrap();

        let lines = run_script(
            &mut s,
            "stars /tmp/stars_no_such_catalog.csv\nnaive_neighbors 1 0 0 0\n",
        );
        assert!(lines[0].starts_with("ERROR: failed to read catalog"));
        assert_eq!(ids(&lines[1..]), vec!["0"]);
    }

    #[test]
    fn seeded_sessions_agree_on_ties() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_catalog(
            dir.path(),
            "0,O,0,0,0\n1,A,1,0,0\n2,B,0,1,0\n3,C,0,0,1\n4,D,-1,0,0\n",
        );
        let script = "naive_neighbors 2 \"O\"\nnaive_neighbors 3 0 0 0\n";

        let mut a = Session::new(&StarsConfig::default(), make_rng(Some(11)));
        a.load(&path).unwrap();
        let mut b = Session::new(&StarsConfig::default(), make_rng(Some(11)));
        b.load(&path).unwrap();

        assert_eq!(run_script(&mut a, script), run_script(&mut b, script));
    }
}
