pub mod my_page;
