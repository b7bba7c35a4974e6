pub mod clinics;
pub mod health;
