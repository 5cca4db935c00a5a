//! Jobs: fetches the listings, keeps the loading flag, and filters the fetched
//! postings against the active filter set owned by `filters`.

pub mod client;
pub mod handlers;
pub mod models;
pub mod store;
pub mod target;
mod view;

pub use client::JobsClient;
pub use models::JobPosting;
pub use store::Jobs;
pub use target::JobsTarget;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{http::header::CONTENT_TYPE, routing::get, Router};
    use tokio::net::TcpListener;
    use url::Url;

    use super::JobPosting;

    pub const FIXTURE_JOBS: &str = r#"[
        {
            "id": 1, "company": "Photosnap", "logo": "./images/photosnap.svg",
            "new": true, "featured": true, "position": "Senior Frontend Developer",
            "role": "Frontend", "level": "Senior", "postedAt": "1d ago",
            "contract": "Full Time", "location": "USA Only",
            "languages": ["HTML", "CSS", "JavaScript"], "tools": []
        },
        {
            "id": 2, "company": "Manage", "logo": "./images/manage.svg",
            "new": true, "featured": true, "position": "Fullstack Developer",
            "role": "Fullstack", "level": "Midweight", "postedAt": "1d ago",
            "contract": "Part Time", "location": "Remote",
            "languages": ["Python"], "tools": ["React"]
        },
        {
            "id": 3, "company": "Account",
            "new": true, "featured": false, "position": "Junior Frontend Developer",
            "role": "Frontend", "level": "Junior", "postedAt": "2d ago",
            "contract": "Part Time", "location": "USA Only",
            "languages": ["JavaScript"], "tools": ["React", "Sass"]
        },
        {
            "id": 4, "company": "MyHome",
            "new": false, "featured": false, "position": "Junior Frontend Developer",
            "role": "Frontend", "level": "Junior", "postedAt": "5d ago",
            "contract": "Contract", "location": "USA Only",
            "languages": ["CSS", "JavaScript"], "tools": []
        }
    ]"#;

    pub fn fixture_postings() -> Vec<JobPosting> {
        serde_json::from_str::<Vec<JobPosting>>(FIXTURE_JOBS)
            .unwrap()
            .into_iter()
            .map(JobPosting::with_keywords)
            .collect()
    }

    /// Serves `data.json` (the fixture) and `malformed/data.json` on an ephemeral port.
    /// Anything else is a 404. Returns the base URL.
    pub async fn serve_fixtures() -> Url {
        let router = Router::new()
            .route(
                "/data.json",
                get(|| async { ([(CONTENT_TYPE, "application/json")], FIXTURE_JOBS) }),
            )
            .route(
                "/malformed/data.json",
                get(|| async { ([(CONTENT_TYPE, "application/json")], r#"[{"company": "#) }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    /// URL on a port nothing listens on.
    pub async fn closed_port_url() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}/data.json")).unwrap()
    }
}
