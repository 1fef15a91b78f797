mod shirts;
mod users;
