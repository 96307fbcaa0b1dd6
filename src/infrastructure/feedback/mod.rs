pub mod notice_board;
