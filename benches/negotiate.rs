#![feature(test)]

extern crate test;

use conneg::{Aliases, Kind, Negotiator};
use test::Bencher;

const PEAR: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,text/*;q=0.7,*/*,image/gif; q=0.8, image/jpeg; q=0.6, image/*";

#[bench]
fn parse_accept(b: &mut Bencher) {
    b.bytes = PEAR.len() as u64;
    b.iter(|| conneg::parse(Kind::Media, PEAR))
}

#[bench]
fn parse_accept_language(b: &mut Bencher) {
    let s = "da, en-gb;q=0.8, en;q=0.7, *";
    b.bytes = s.len() as u64;
    b.iter(|| conneg::parse(Kind::Language, s))
}

#[bench]
fn negotiate_accept(b: &mut Bencher) {
    let candidates = ["image/gif", "image/png", "application/xml", "image/jpeg", "text/plain"];
    b.bytes = PEAR.len() as u64;
    b.iter(|| conneg::negotiate_media(PEAR, &candidates))
}

#[bench]
fn negotiate_accept_aliases(b: &mut Bencher) {
    let negotiator = Negotiator::new(
        Aliases::new()
            .with("html", "text/html")
            .with("xml", "application/xml")
            .with("txt", "text/plain"),
    );
    let candidates = ["txt", "xml", "html"];
    b.bytes = PEAR.len() as u64;
    b.iter(|| negotiator.media(PEAR, &candidates))
}
