//! Line commands read from stdin.
//!
//! Any line not starting with `:` replaces the search text verbatim.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Replace the search text.
	Text(String),
	/// Empty the search text.
	Clear,
	/// Set a filter: `:set KEY=VALUE`.
	Set { key: String, value: String },
	/// Unset a filter: `:unset KEY`.
	Unset(String),
	/// Re-dispatch the current query.
	Refresh,
	/// Print the current state.
	State,
	Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	#[error("unknown command ':{0}'")]
	Unknown(String),
	#[error("usage: {0}")]
	Usage(&'static str),
}

impl Command {
	pub fn parse(line: &str) -> Result<Self, CommandError> {
		let Some(rest) = line.strip_prefix(':') else {
			return Ok(Self::Text(line.to_string()));
		};

		let rest = rest.trim();
		let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
		let args = args.trim();

		match name {
			"clear" => Ok(Self::Clear),
			"refresh" | "r" => Ok(Self::Refresh),
			"state" | "s" => Ok(Self::State),
			"quit" | "q" => Ok(Self::Quit),
			"set" => {
				let (key, value) = args
					.split_once('=')
					.filter(|(key, _)| !key.trim().is_empty())
					.ok_or(CommandError::Usage(":set KEY=VALUE"))?;
				Ok(Self::Set {
					key: key.trim().to_string(),
					value: value.trim().to_string(),
				})
			}
			"unset" if !args.is_empty() && !args.contains(char::is_whitespace) => Ok(Self::Unset(args.to_string())),
			"unset" => Err(CommandError::Usage(":unset KEY")),
			other => Err(CommandError::Unknown(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("rum", Command::Text("rum".into()))]
	#[case("  old tom ", Command::Text("  old tom ".into()))]
	#[case("", Command::Text(String::new()))]
	#[case(":clear", Command::Clear)]
	#[case(":r", Command::Refresh)]
	#[case(":state", Command::State)]
	#[case(":q", Command::Quit)]
	#[case(":unset is_active", Command::Unset("is_active".into()))]
	fn parses(#[case] line: &str, #[case] expected: Command) {
		assert_eq!(Command::parse(line), Ok(expected));
	}

	#[test]
	fn set_splits_on_first_equals() {
		assert_eq!(
			Command::parse(":set category_id = a=b"),
			Ok(Command::Set {
				key: "category_id".into(),
				value: "a=b".into(),
			})
		);
	}

	#[rstest]
	#[case(":set category_id")]
	#[case(":set =7")]
	#[case(":unset")]
	fn malformed_arguments_show_usage(#[case] line: &str) {
		assert!(matches!(Command::parse(line), Err(CommandError::Usage(_))));
	}

	#[test]
	fn unknown_command() {
		assert_eq!(Command::parse(":frobnicate"), Err(CommandError::Unknown("frobnicate".into())));
	}
}
