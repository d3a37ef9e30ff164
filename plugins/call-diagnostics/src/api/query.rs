use crate::ResultSender;

use super::{Config, Status, Surfaces};

#[derive(Debug)]
pub enum Query {
    Config(ResultSender<Config>),
    Status(ResultSender<Status>),
    Surfaces(ResultSender<Surfaces>),
}
