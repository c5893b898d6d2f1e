//! Builders shared by unit tests.

use crate::models::{Content, ContentStatus, TeamMember, TimeEntry};

pub fn member(id: &str, name: &str) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        email: String::new(),
        phone: String::new(),
        role: String::new(),
        assigned_clients: Vec::new(),
        hourly_rate: None,
        photo_url: String::new(),
        notes: String::new(),
    }
}

pub fn task(id: &str, owner: &str, status: ContentStatus, deadline: &str) -> Content {
    Content {
        id: id.to_string(),
        title: format!("Task {id}"),
        owner: owner.to_string(),
        client: "Acme".to_string(),
        status,
        deadline: deadline.to_string(),
        description: None,
    }
}

pub fn time_entry(team_member: &str, date: &str, duration: f64) -> TimeEntry {
    TimeEntry {
        id: format!("{team_member}-{date}"),
        date: date.to_string(),
        team_member: team_member.to_string(),
        client: "Acme".to_string(),
        task: "Editing".to_string(),
        duration,
    }
}
