pub mod currency_com;
