pub mod bookingdb;
pub mod db;
pub mod messagedb;
pub mod profiledb;
pub mod reviewdb;
pub mod testimonialdb;
pub mod userdb;
