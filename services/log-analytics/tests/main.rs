mod live;
mod send_flow;
