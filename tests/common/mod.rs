#![allow(dead_code)]

use files_api_router::{
    AppController, AuthController, Controllers, HandlerError, HandlerResult, UsersController,
};

/// Minimal request/response context standing in for a host server's.
#[derive(Debug, Default)]
pub struct Exchange {
    pub calls: Vec<&'static str>,
    pub status: u16,
    pub body: String,
}

pub struct App;

impl AppController<Exchange> for App {
    fn get_status(&self, ctx: &mut Exchange) -> HandlerResult {
        ctx.calls.push("get_status");
        ctx.status = 200;
        ctx.body = r#"{"redis":true,"db":true}"#.to_string();
        Ok(())
    }

    fn get_stats(&self, ctx: &mut Exchange) -> HandlerResult {
        ctx.calls.push("get_stats");
        ctx.status = 200;
        ctx.body = r#"{"users":2,"files":5}"#.to_string();
        Ok(())
    }
}

pub struct Auth;

impl AuthController<Exchange> for Auth {
    fn get_connect(&self, ctx: &mut Exchange) -> HandlerResult {
        ctx.calls.push("get_connect");
        ctx.status = 200;
        Ok(())
    }

    fn get_disconnect(&self, ctx: &mut Exchange) -> HandlerResult {
        ctx.calls.push("get_disconnect");
        ctx.status = 204;
        Ok(())
    }
}

pub struct Users;

impl UsersController<Exchange> for Users {
    fn get_me(&self, ctx: &mut Exchange) -> HandlerResult {
        ctx.calls.push("get_me");
        ctx.status = 401;
        Err(HandlerError::new("Unauthorized"))
    }

    fn post_new(&self, ctx: &mut Exchange) -> HandlerResult {
        ctx.calls.push("post_new");
        ctx.status = 201;
        Ok(())
    }
}

pub fn controllers() -> Controllers<Exchange> {
    Controllers::new(App, Auth, Users)
}
