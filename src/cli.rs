//! Command-line interface parsing for the SignClass CLI
//!
//! This module handles parsing of CLI arguments using clap: one subcommand
//! per platform operation, plus backend connection flags that can also come
//! from the environment.

use clap::{Parser, Subcommand};
use thiserror::Error;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The search query contained no usable terms
    #[error("Search query must not be empty")]
    EmptyQuery,
}

/// SignClass CLI - classrooms, exams, games, and the sign-language library
#[derive(Parser, Debug)]
#[command(name = "signclass")]
#[command(about = "Browse SignClass classrooms, exams, learning games, media galleries, and sign-language videos")]
#[command(version)]
pub struct Cli {
    /// Base URL of the backend document service
    #[arg(long, env = "SIGNCLASS_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Project identifier sent with every backend request
    #[arg(long, env = "SIGNCLASS_PROJECT", default_value = "signclass", global = true)]
    pub project: String,

    /// API key for the backend
    #[arg(long, env = "SIGNCLASS_API_KEY", default_value = "", global = true)]
    pub api_key: String,

    /// Bypass the in-memory cache; every command hits the backend
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all classrooms
    Classrooms,
    /// Show a single classroom
    Classroom {
        /// Classroom id
        id: String,
    },
    /// List the students enrolled in a classroom
    Roster {
        /// Classroom id
        classroom_id: String,
    },
    /// Rename a classroom
    Rename {
        /// Classroom id
        id: String,
        /// New name
        name: String,
    },
    /// List the exams scheduled for a classroom
    Exams {
        /// Classroom id
        classroom_id: String,
    },
    /// Publish an exam so students can see it
    Publish {
        /// Classroom id
        classroom_id: String,
        /// Exam id
        exam_id: String,
    },
    /// List the learning-game catalog
    Games,
    /// List a classroom's media gallery
    Gallery {
        /// Classroom id
        classroom_id: String,
    },
    /// List sign-language videos
    Signs {
        /// Only show videos in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Search sign videos and games by title, keyword, or category
    Search {
        /// Query terms
        #[arg(required = true)]
        query: Vec<String>,
        /// Also search this classroom's media gallery
        #[arg(long)]
        classroom: Option<String>,
    },
    /// Refresh data in the background and print updates until Ctrl-C
    Watch,
}

/// Joins raw query words into a single query string.
///
/// # Returns
/// * `Ok(String)` if the joined query contains at least one term
/// * `Err(CliError::EmptyQuery)` if the words are all whitespace
pub fn search_query(words: &[String]) -> Result<String, CliError> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        return Err(CliError::EmptyQuery);
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_joins_words() {
        let words = vec!["good".to_string(), "morning".to_string()];
        assert_eq!(search_query(&words).unwrap(), "good morning");
    }

    #[test]
    fn test_search_query_rejects_whitespace_only() {
        let words = vec!["   ".to_string()];
        let err = search_query(&words).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_cli_parse_classrooms() {
        let cli = Cli::parse_from(["signclass", "classrooms"]);
        assert!(matches!(cli.command, Command::Classrooms));
        assert!(!cli.no_cache);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_classroom_with_id() {
        let cli = Cli::parse_from(["signclass", "classroom", "cls-42"]);
        match cli.command {
            Command::Classroom { id } => assert_eq!(id, "cls-42"),
            other => panic!("Expected Classroom, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_rename() {
        let cli = Cli::parse_from(["signclass", "rename", "cls-42", "10B"]);
        match cli.command {
            Command::Rename { id, name } => {
                assert_eq!(id, "cls-42");
                assert_eq!(name, "10B");
            }
            other => panic!("Expected Rename, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_signs_with_category() {
        let cli = Cli::parse_from(["signclass", "signs", "--category", "alphabet"]);
        match cli.command {
            Command::Signs { category } => assert_eq!(category.as_deref(), Some("alphabet")),
            other => panic!("Expected Signs, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_search_collects_terms() {
        let cli = Cli::parse_from(["signclass", "search", "good", "morning"]);
        match cli.command {
            Command::Search { query, classroom } => {
                assert_eq!(query, vec!["good".to_string(), "morning".to_string()]);
                assert!(classroom.is_none());
            }
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_search_requires_terms() {
        let result = Cli::try_parse_from(["signclass", "search"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::parse_from([
            "signclass",
            "classrooms",
            "--no-cache",
            "--verbose",
            "--project",
            "school-7",
        ]);
        assert!(cli.no_cache);
        assert!(cli.verbose);
        assert_eq!(cli.project, "school-7");
    }

    #[test]
    fn test_cli_parse_backend_url_flag() {
        let cli = Cli::parse_from([
            "signclass",
            "--backend-url",
            "http://localhost:8080/v1",
            "games",
        ]);
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_cli_parse_unknown_subcommand_fails() {
        let result = Cli::try_parse_from(["signclass", "beaches"]);
        assert!(result.is_err());
    }
}
