//! Core data models for the SignClass CLI
//!
//! This module contains the domain types used throughout the application
//! for representing classrooms, exams, learning games, media galleries,
//! and sign-language videos.

pub mod backend;
pub mod classrooms;
pub mod exams;
pub mod library;

pub use backend::{BackendClient, BackendError};
pub use classrooms::{ClassroomClient, ClassroomError};
pub use exams::{ExamClient, ExamError};
#[allow(unused_imports)]
pub use library::{LibraryClient, LibraryError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A classroom on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique identifier for the classroom
    pub id: String,
    /// Human-readable name (e.g. "10A")
    pub name: String,
    /// Grade level taught in this classroom (1-12)
    pub grade_level: u8,
    /// Identifier of the teacher who owns the classroom
    pub teacher_id: String,
    /// Number of enrolled students
    pub student_count: u32,
    /// Whether the classroom has been archived at end of term
    #[serde(default)]
    pub archived: bool,
}

/// A student enrolled in a classroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier for the student
    pub id: String,
    /// Display name
    pub name: String,
    /// Classroom the student is enrolled in
    pub classroom_id: String,
}

/// School subjects used by exams and learning games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Language,
    Science,
    SocialStudies,
    Art,
}

impl Subject {
    /// Returns a human-readable display label for the subject.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Language => "Language",
            Subject::Science => "Science",
            Subject::SocialStudies => "Social Studies",
            Subject::Art => "Art",
        }
    }

    /// Parses user input into a Subject.
    ///
    /// Matching is case-insensitive and supports aliases:
    /// - "math" | "maths" -> Math
    /// - "language" | "lang" -> Language
    /// - "science" -> Science
    /// - "social" | "social-studies" -> SocialStudies
    /// - "art" -> Art
    ///
    /// Returns `None` if the input doesn't match any subject.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Subject> {
        match s.to_lowercase().trim() {
            "math" | "maths" => Some(Subject::Math),
            "language" | "lang" => Some(Subject::Language),
            "science" => Some(Subject::Science),
            "social" | "social-studies" | "social studies" => Some(Subject::SocialStudies),
            "art" => Some(Subject::Art),
            _ => None,
        }
    }
}

/// An exam scheduled for a classroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Unique identifier for the exam
    pub id: String,
    /// Classroom the exam belongs to
    pub classroom_id: String,
    /// Exam title shown to students
    pub title: String,
    /// Subject the exam covers
    pub subject: Subject,
    /// When the exam is scheduled to start
    pub scheduled_at: DateTime<Utc>,
    /// Allotted time in minutes
    pub duration_minutes: u32,
    /// Number of questions on the exam
    pub question_count: u32,
    /// Whether students can see the exam yet
    #[serde(default)]
    pub published: bool,
}

/// A learning game from the platform catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier for the game
    pub id: String,
    /// Game title
    pub title: String,
    /// Subject the game teaches
    pub subject: Subject,
    /// Lowest grade the game is suitable for
    pub min_grade: u8,
    /// Highest grade the game is suitable for
    pub max_grade: u8,
    /// Total play count across the platform
    #[serde(default)]
    pub plays: u64,
}

/// Kinds of files that appear in a classroom gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    /// Returns a human-readable display label for the media kind.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Document => "Document",
        }
    }
}

/// A file in a classroom's media gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique identifier for the gallery entry
    pub id: String,
    /// Classroom the item was uploaded to
    pub classroom_id: String,
    /// Title shown in the gallery
    pub title: String,
    /// What kind of file this is
    pub kind: MediaKind,
    /// Identifier of the stored blob
    pub file_id: String,
    /// When the file was uploaded
    pub uploaded_at: DateTime<Utc>,
}

/// A video from the sign-language library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignVideo {
    /// Unique identifier for the video
    pub id: String,
    /// Title of the sign being demonstrated
    pub title: String,
    /// Library category (e.g. "alphabet", "numbers", "everyday")
    pub category: String,
    /// Search keywords attached by the curators
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Identifier of the stored video blob
    pub video_file_id: String,
    /// Length of the clip in seconds
    pub duration_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classroom_creation() {
        let classroom = Classroom {
            id: "cls-42".to_string(),
            name: "10A".to_string(),
            grade_level: 10,
            teacher_id: "tch-7".to_string(),
            student_count: 24,
            archived: false,
        };

        assert_eq!(classroom.id, "cls-42");
        assert_eq!(classroom.name, "10A");
        assert_eq!(classroom.grade_level, 10);
        assert!(!classroom.archived);
    }

    #[test]
    fn test_classroom_serialization_roundtrip() {
        let classroom = Classroom {
            id: "cls-42".to_string(),
            name: "10A".to_string(),
            grade_level: 10,
            teacher_id: "tch-7".to_string(),
            student_count: 24,
            archived: true,
        };

        let json = serde_json::to_string(&classroom).expect("Failed to serialize Classroom");
        let deserialized: Classroom =
            serde_json::from_str(&json).expect("Failed to deserialize Classroom");

        assert_eq!(deserialized.id, classroom.id);
        assert_eq!(deserialized.name, classroom.name);
        assert_eq!(deserialized.grade_level, classroom.grade_level);
        assert_eq!(deserialized.student_count, classroom.student_count);
        assert!(deserialized.archived);
    }

    #[test]
    fn test_classroom_archived_defaults_to_false() {
        let json = r#"{
            "id": "cls-1",
            "name": "3B",
            "grade_level": 3,
            "teacher_id": "tch-2",
            "student_count": 18
        }"#;

        let classroom: Classroom =
            serde_json::from_str(json).expect("Failed to deserialize Classroom");
        assert!(!classroom.archived);
    }

    #[test]
    fn test_subject_labels() {
        assert_eq!(Subject::Math.label(), "Math");
        assert_eq!(Subject::SocialStudies.label(), "Social Studies");
    }

    #[test]
    fn test_subject_from_str_aliases() {
        assert_eq!(Subject::from_str("math"), Some(Subject::Math));
        assert_eq!(Subject::from_str("MATHS"), Some(Subject::Math));
        assert_eq!(Subject::from_str("lang"), Some(Subject::Language));
        assert_eq!(
            Subject::from_str("social-studies"),
            Some(Subject::SocialStudies)
        );
        assert_eq!(Subject::from_str("unknown"), None);
    }

    #[test]
    fn test_subject_serializes_snake_case() {
        let json = serde_json::to_string(&Subject::SocialStudies).unwrap();
        assert_eq!(json, "\"social_studies\"");
    }

    #[test]
    fn test_exam_serialization_roundtrip() {
        let exam = Exam {
            id: "exm-9".to_string(),
            classroom_id: "cls-42".to_string(),
            title: "Fractions quiz".to_string(),
            subject: Subject::Math,
            scheduled_at: Utc::now(),
            duration_minutes: 45,
            question_count: 12,
            published: false,
        };

        let json = serde_json::to_string(&exam).expect("Failed to serialize Exam");
        let deserialized: Exam = serde_json::from_str(&json).expect("Failed to deserialize Exam");

        assert_eq!(deserialized.id, exam.id);
        assert_eq!(deserialized.subject, Subject::Math);
        assert_eq!(deserialized.duration_minutes, 45);
        assert!(!deserialized.published);
    }

    #[test]
    fn test_media_kind_variants() {
        let kinds = [MediaKind::Image, MediaKind::Video, MediaKind::Document];

        // Verify all variants are distinct
        for (i, kind1) in kinds.iter().enumerate() {
            for (j, kind2) in kinds.iter().enumerate() {
                if i == j {
                    assert_eq!(kind1, kind2);
                } else {
                    assert_ne!(kind1, kind2);
                }
            }
        }
    }

    #[test]
    fn test_sign_video_keywords_default_empty() {
        let json = r#"{
            "id": "sv-1",
            "title": "Hello",
            "category": "everyday",
            "video_file_id": "blob-17",
            "duration_seconds": 8
        }"#;

        let video: SignVideo =
            serde_json::from_str(json).expect("Failed to deserialize SignVideo");
        assert!(video.keywords.is_empty());
        assert_eq!(video.category, "everyday");
    }
}
