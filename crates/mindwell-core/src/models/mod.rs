pub mod answer;
pub mod clinical;
pub mod mood;
pub mod question;
pub mod session;
