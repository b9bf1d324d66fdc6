//! Print a signed access token for local development.
//!
//! Usage: `dev-token [user-uuid] [email]`. Requires `JWT_SECRET`.

use uuid::Uuid;

fn main() {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args().skip(1);
    let user_id = match args.next().map(|s| Uuid::parse_str(&s)) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            eprintln!("Invalid user id: {e}");
            std::process::exit(2);
        }
        None => Uuid::new_v4(),
    };
    let email = args.next().unwrap_or_else(|| "dev@example.com".to_string());

    match server::auth::jwt::issue_access_token(user_id, &email, 24 * 60) {
        Ok(token) => {
            eprintln!("user {user_id} <{email}>");
            println!("{token}");
        }
        Err(e) => {
            eprintln!("Failed to sign token: {e}");
            std::process::exit(1);
        }
    }
}
