use sqlx::SqlitePool;

use crate::database::{participants_repo, students_repo, teachers_repo};

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  name TEXT PRIMARY KEY,
  description TEXT NOT NULL,
  schedule TEXT NOT NULL,
  days TEXT,
  start_time TEXT,
  end_time TEXT,
  max_participants INTEGER NOT NULL,
  category TEXT
)
"#;

const SQL_CREATE_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS activity_participants (
  activity_name TEXT NOT NULL,
  email TEXT NOT NULL,
  joined_at TEXT NOT NULL,
  PRIMARY KEY (activity_name, email)
)
"#;

const SQL_CREATE_STUDENTS: &str = r#"
CREATE TABLE IF NOT EXISTS students (
  email TEXT PRIMARY KEY,
  display_name TEXT NOT NULL,
  grade_level INTEGER
)
"#;

const SQL_CREATE_TEACHERS: &str = r#"
CREATE TABLE IF NOT EXISTS teachers (
  username TEXT PRIMARY KEY,
  display_name TEXT NOT NULL,
  password TEXT NOT NULL
)
"#;

const SQL_CREATE_ANNOUNCEMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS announcements (
  id TEXT PRIMARY KEY,
  message TEXT NOT NULL,
  starts_at TEXT,
  expires_at TEXT NOT NULL,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
)
"#;

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  name, description, schedule, days, start_time, end_time, max_participants, category
) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

const SQL_COUNT_ACTIVITIES: &str = "SELECT COUNT(*) FROM activities";

/// Create all tables and seed a first-run database. Safe to call on every
/// startup; seeding only happens while the activities table is empty.
pub async fn init(pool: &SqlitePool) -> sqlx::Result<()> {
    for sql in [
        SQL_CREATE_ACTIVITIES,
        SQL_CREATE_PARTICIPANTS,
        SQL_CREATE_STUDENTS,
        SQL_CREATE_TEACHERS,
        SQL_CREATE_ANNOUNCEMENTS,
    ] {
        sqlx::query(sql).execute(pool).await?;
    }

    let (count,): (i64,) = sqlx::query_as(SQL_COUNT_ACTIVITIES).fetch_one(pool).await?;
    if count == 0 {
        seed(pool).await?;
        tracing::info!("seeded first-run database");
    }

    Ok(())
}

struct SeedActivity {
    name: &'static str,
    description: &'static str,
    schedule: &'static str,
    days: Option<&'static [&'static str]>,
    start_time: Option<&'static str>,
    end_time: Option<&'static str>,
    max_participants: i64,
    category: &'static str,
    participants: &'static [&'static str],
}

const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Mondays and Fridays, 3:15 PM - 4:45 PM",
        days: Some(&["Monday", "Friday"]),
        start_time: Some("15:15"),
        end_time: Some("16:45"),
        max_participants: 12,
        category: "academic",
        participants: &["michael@northgate.edu", "daniel@northgate.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        days: Some(&["Tuesday", "Thursday"]),
        start_time: Some("15:30"),
        end_time: Some("16:30"),
        max_participants: 20,
        category: "technology",
        participants: &["emma@northgate.edu", "sophia@northgate.edu"],
    },
    SeedActivity {
        name: "Morning Fitness",
        description: "Early morning conditioning and strength training",
        schedule: "Mondays, Wednesdays, Fridays, 6:30 AM - 7:45 AM",
        days: Some(&["Monday", "Wednesday", "Friday"]),
        start_time: Some("06:30"),
        end_time: Some("07:45"),
        max_participants: 30,
        category: "sports",
        participants: &["john@northgate.edu", "olivia@northgate.edu"],
    },
    SeedActivity {
        name: "Soccer Team",
        description: "Join the school soccer team and compete in local leagues",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        days: Some(&["Tuesday", "Thursday"]),
        start_time: Some("16:00"),
        end_time: Some("17:30"),
        max_participants: 22,
        category: "sports",
        participants: &["liam@northgate.edu", "noah@northgate.edu"],
    },
    SeedActivity {
        name: "Basketball Team",
        description: "Practice and compete in basketball tournaments",
        schedule: "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        days: Some(&["Wednesday", "Friday"]),
        start_time: Some("15:30"),
        end_time: Some("17:00"),
        max_participants: 15,
        category: "sports",
        participants: &["ava@northgate.edu", "mia@northgate.edu"],
    },
    SeedActivity {
        name: "Art Club",
        description: "Explore drawing, painting, and mixed-media techniques",
        schedule: "Thursdays, 3:15 PM - 5:00 PM",
        days: Some(&["Thursday"]),
        start_time: Some("15:15"),
        end_time: Some("17:00"),
        max_participants: 15,
        category: "arts",
        participants: &["amelia@northgate.edu", "harper@northgate.edu"],
    },
    SeedActivity {
        name: "Drama Club",
        description: "Act, direct, and produce the spring theater showcase",
        schedule: "Mondays and Wednesdays, 3:30 PM - 5:30 PM",
        days: Some(&["Monday", "Wednesday"]),
        start_time: Some("15:30"),
        end_time: Some("17:30"),
        max_participants: 20,
        category: "arts",
        participants: &["ella@northgate.edu", "scarlett@northgate.edu"],
    },
    SeedActivity {
        name: "Math Club",
        description: "Problem solving sessions and math competition prep",
        schedule: "Tuesdays, 7:15 AM - 8:00 AM",
        days: Some(&["Tuesday"]),
        start_time: Some("07:15"),
        end_time: Some("08:00"),
        max_participants: 10,
        category: "academic",
        participants: &["james@northgate.edu", "benjamin@northgate.edu"],
    },
    SeedActivity {
        name: "Debate Team",
        description: "Research, argue, and travel to regional debate meets",
        schedule: "Fridays, 3:30 PM - 5:30 PM",
        days: Some(&["Friday"]),
        start_time: Some("15:30"),
        end_time: Some("17:30"),
        max_participants: 12,
        category: "academic",
        participants: &["charlotte@northgate.edu", "henry@northgate.edu"],
    },
    SeedActivity {
        name: "Weekend Robotics Workshop",
        description: "Build and program robots for the spring exhibition",
        schedule: "Saturdays, 10:00 AM - 2:00 PM",
        days: Some(&["Saturday"]),
        start_time: Some("10:00"),
        end_time: Some("14:00"),
        max_participants: 15,
        category: "technology",
        participants: &["ethan@northgate.edu", "oliver@northgate.edu"],
    },
    SeedActivity {
        name: "Science Olympiad",
        description: "Prepare for science competitions across disciplines",
        schedule: "Saturdays, 1:00 PM - 4:00 PM",
        days: Some(&["Saturday"]),
        start_time: Some("13:00"),
        end_time: Some("16:00"),
        max_participants: 18,
        category: "academic",
        participants: &["isabella@northgate.edu", "lucas@northgate.edu"],
    },
    SeedActivity {
        name: "Sunday Chess Tournament",
        description: "Monthly rated tournament open to all skill levels",
        schedule: "Sundays, 2:00 PM - 5:00 PM",
        days: Some(&["Sunday"]),
        start_time: Some("14:00"),
        end_time: Some("17:00"),
        max_participants: 16,
        category: "academic",
        participants: &["michael@northgate.edu"],
    },
    SeedActivity {
        name: "Community Garden Volunteers",
        description: "Maintain the neighborhood garden and run food drives",
        schedule: "Saturdays, 9:00 AM - 11:00 AM",
        days: Some(&["Saturday"]),
        start_time: Some("09:00"),
        end_time: Some("11:00"),
        max_participants: 25,
        category: "community",
        participants: &["grace@northgate.edu", "leo@northgate.edu"],
    },
    // No structured schedule on purpose: exercises the unfiltered fallback.
    SeedActivity {
        name: "Open Gym",
        description: "Drop in whenever the gym is free for casual play",
        schedule: "Varies, check the gym door for this week's open hours",
        days: None,
        start_time: None,
        end_time: None,
        max_participants: 40,
        category: "sports",
        participants: &[],
    },
];

const SEED_TEACHERS: &[(&str, &str, &str)] = &[
    ("mrodriguez", "Ms. Rodriguez", "art123"),
    ("mchen", "Mr. Chen", "chess456"),
    ("principal", "Principal Martinez", "admin789"),
];

const SEED_STUDENTS: &[(&str, &str, i64)] = &[
    ("michael@northgate.edu", "Michael", 10),
    ("daniel@northgate.edu", "Daniel", 11),
    ("emma@northgate.edu", "Emma", 9),
    ("sophia@northgate.edu", "Sophia", 12),
    ("john@northgate.edu", "John", 10),
    ("olivia@northgate.edu", "Olivia", 9),
    ("liam@northgate.edu", "Liam", 11),
    ("noah@northgate.edu", "Noah", 10),
    ("ava@northgate.edu", "Ava", 12),
    ("mia@northgate.edu", "Mia", 9),
    ("amelia@northgate.edu", "Amelia", 10),
    ("harper@northgate.edu", "Harper", 11),
    ("ella@northgate.edu", "Ella", 9),
    ("scarlett@northgate.edu", "Scarlett", 12),
    ("james@northgate.edu", "James", 10),
    ("benjamin@northgate.edu", "Benjamin", 11),
    ("charlotte@northgate.edu", "Charlotte", 12),
    ("henry@northgate.edu", "Henry", 9),
    ("ethan@northgate.edu", "Ethan", 10),
    ("oliver@northgate.edu", "Oliver", 11),
    ("isabella@northgate.edu", "Isabella", 12),
    ("lucas@northgate.edu", "Lucas", 9),
    ("grace@northgate.edu", "Grace", 10),
    ("leo@northgate.edu", "Leo", 11),
];

async fn seed(pool: &SqlitePool) -> sqlx::Result<()> {
    for (email, name, grade) in SEED_STUDENTS {
        students_repo::insert_student(pool, email, name, Some(*grade)).await?;
    }

    for (username, display_name, password) in SEED_TEACHERS {
        teachers_repo::insert_teacher(pool, username, display_name, password).await?;
    }

    for activity in SEED_ACTIVITIES {
        let days_json = activity
            .days
            .map(|days| serde_json::to_string(days).expect("weekday list serializes"));

        sqlx::query(SQL_INSERT_ACTIVITY)
            .bind(activity.name)
            .bind(activity.description)
            .bind(activity.schedule)
            .bind(days_json)
            .bind(activity.start_time)
            .bind(activity.end_time)
            .bind(activity.max_participants)
            .bind(activity.category)
            .execute(pool)
            .await?;

        for email in activity.participants {
            participants_repo::signup_if_capacity(pool, activity.name, email).await?;
        }
    }

    Ok(())
}
