mod velocity;
mod distributions;
mod pointers;
