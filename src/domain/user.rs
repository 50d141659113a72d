use super::task::Subject;

/// Exam track a user is preparing for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetExam {
    Jee,
    Neet,
}

impl TargetExam {
    /// Subjects offered for this track
    pub fn subjects(&self) -> &'static [Subject] {
        match self {
            TargetExam::Jee => &[Subject::Physics, Subject::Chemistry, Subject::Mathematics],
            TargetExam::Neet => &[Subject::Physics, Subject::Chemistry, Subject::Biology],
        }
    }

    /// Display name for the track
    pub fn name(&self) -> &'static str {
        match self {
            TargetExam::Jee => "JEE",
            TargetExam::Neet => "NEET",
        }
    }
}

/// One of the two fixed operatives. Identities are immutable and known at
/// process start; they are never created at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub id: &'static str,
    pub username: &'static str,
    pub target: TargetExam,
    pub avatar: &'static str,
}

impl User {
    /// Check whether a subject is offered for this user's track
    pub fn allows_subject(&self, subject: Subject) -> bool {
        self.target.subjects().contains(&subject)
    }

    /// The other operative
    pub fn partner(&self) -> &'static User {
        if self.id == USERS[0].id {
            &USERS[1]
        } else {
            &USERS[0]
        }
    }
}

/// The two fixed accounts
pub const USERS: [User; 2] = [
    User {
        id: "user_marvik",
        username: "Marvik",
        target: TargetExam::Jee,
        avatar: "👨‍💻",
    },
    User {
        id: "user_friend",
        username: "Friend",
        target: TargetExam::Neet,
        avatar: "👩‍⚕️",
    },
];

/// Mood glyphs offered by the daily report form
pub const MOODS: [&str; 8] = ["😊", "😎", "🤓", "😤", "😴", "🔥", "💪", "🎯"];

/// Look up a user by stored username
pub fn by_username(username: &str) -> Option<&'static User> {
    USERS.iter().find(|u| u.username == username)
}

/// Look up a user by record id
pub fn by_id(id: &str) -> Option<&'static User> {
    USERS.iter().find(|u| u.id == id)
}

/// Fixed-list passcode check. This is the whole of the "auth" model: a gate
/// in front of a browser-local-style store, not a security boundary.
pub fn check_passcode(user: &User, passcode: &str) -> bool {
    match user.username {
        "Marvik" => passcode == "marvik123",
        "Friend" => passcode == "friend123",
        _ => false,
    }
}
