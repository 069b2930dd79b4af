use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{Request, Response};

pub struct Cors {
    allowed_origin: String,
}

impl Cors {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self { allowed_origin: allowed_origin.into() }
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", self.allowed_origin.clone()));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, PATCH, DELETE, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        // Browsers refuse credentials alongside a wildcard origin.
        if self.allowed_origin != "*" {
            response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        }
    }
}

// Pre-flight requests for any path
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::Ok
}
