// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive selection among a list of options.
//!
//! ```text
//! choose(prompt, options, preselected) --> selected indices
//!   Preselected    returns `preselected` (non-interactive, CI)
//!   LinePrompt     "1,3" on one line; empty line keeps the preselection
//! ```

use std::io::{BufRead, Write};
use std::sync::Mutex;

use crate::error::{GuardError, GuardResult};

/// Picks a subset of `options`, returned as sorted, deduplicated indices.
pub trait Chooser {
    /// # Errors
    ///
    /// Fails if the answer cannot be read or names an unknown option.
    fn choose(&self, prompt: &str, options: &[&str], preselected: &[usize])
    -> GuardResult<Vec<usize>>;
}

/// Accepts the preselection without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preselected;

impl Chooser for Preselected {
    fn choose(
        &self,
        _prompt: &str,
        options: &[&str],
        preselected: &[usize],
    ) -> GuardResult<Vec<usize>> {
        Ok(normalize(preselected.iter().copied(), options.len()))
    }
}

/// Numbered menu answered with comma-separated indices (1-based).
pub struct LinePrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> std::fmt::Debug for LinePrompt<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinePrompt").finish_non_exhaustive()
    }
}

impl LinePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the terminal.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }
}

impl<R: BufRead, W: Write> Chooser for LinePrompt<R, W> {
    fn choose(
        &self,
        prompt: &str,
        options: &[&str],
        preselected: &[usize],
    ) -> GuardResult<Vec<usize>> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| GuardError::other("menu indisponible"))?;
        let (input, output) = &mut *guard;

        writeln!(output, "{prompt}")?;
        for (index, option) in options.iter().enumerate() {
            let mark = if preselected.contains(&index) { 'x' } else { ' ' };
            writeln!(output, "  [{mark}] {}. {option}", index + 1)?;
        }
        write!(output, "Choix (ex: 1,3) [Entrée pour garder la sélection]: ")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        parse_selection(&line, options.len(), preselected)
    }
}

/// Parses `"1, 3"` into zero-based indices. Blank input keeps `preselected`.
///
/// # Errors
///
/// Fails on a non-numeric entry or an index outside `1..=count`.
pub fn parse_selection(line: &str, count: usize, preselected: &[usize]) -> GuardResult<Vec<usize>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(normalize(preselected.iter().copied(), count));
    }

    let mut indices = Vec::new();
    for entry in line.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => indices.push(n - 1),
            _ => return Err(GuardError::other(format!("Choix invalide: {entry}"))),
        }
    }
    Ok(normalize(indices.into_iter(), count))
}

fn normalize(indices: impl Iterator<Item = usize>, count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = indices.filter(|&i| i < count).collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const OPTIONS: [&str; 4] = ["github", "gitlab", "bitbucket", "azure"];

    #[test]
    fn test_preselected_keeps_valid_indices() {
        let chosen = Preselected.choose("?", &OPTIONS, &[1, 0, 9, 1]).unwrap();
        assert_eq!(chosen, vec![0, 1]);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("3, 1,3", 4, &[]).unwrap(), vec![0, 2]);
        assert_eq!(parse_selection("  \n", 4, &[0, 1]).unwrap(), vec![0, 1]);
        assert!(parse_selection("5", 4, &[]).is_err());
        assert!(parse_selection("0", 4, &[]).is_err());
        assert!(parse_selection("gitlab", 4, &[]).is_err());
    }

    #[test]
    fn test_line_prompt_renders_menu() {
        let prompt = LinePrompt::new(Cursor::new("2,4\n"), Vec::new());
        let chosen = prompt
            .choose("Plateformes à activer:", &OPTIONS, &[0, 1])
            .unwrap();
        assert_eq!(chosen, vec![1, 3]);

        let (_, output) = prompt.io.into_inner().unwrap();
        let output = String::from_utf8(output).unwrap();
        let menu: Vec<&str> = output.lines().take(5).collect();
        insta::assert_snapshot!(menu.join("\n"), @r"
        Plateformes à activer:
          [x] 1. github
          [x] 2. gitlab
          [ ] 3. bitbucket
          [ ] 4. azure
        ");
        assert!(output.ends_with("[Entrée pour garder la sélection]: "));
    }
}
