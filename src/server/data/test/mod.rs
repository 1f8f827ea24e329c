mod audit;
mod download_export;
mod participant;
mod payment;
mod role;
mod seminar;
mod user;
